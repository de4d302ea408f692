//! The `promis stateless` command.

use anyhow::Result;

use promis_client::{BodyEncoding, PromisClient};
use promis_core::model::{to_item_responses, ResponsePair};
use promis_core::render::render_stateless;

use crate::Cli;

pub async fn execute(
    cli: &Cli,
    form_oid: &str,
    pairs: &[ResponsePair],
    form_body: bool,
    format: &str,
) -> Result<()> {
    let config = cli.resolve_config()?;
    let client = PromisClient::new(&config)?;

    let responses = to_item_responses(pairs);
    let encoding = if form_body {
        BodyEncoding::Form
    } else {
        BodyEncoding::Json
    };

    let data = client.stateless_next(form_oid, &responses, encoding).await?;
    super::print_response(&data, format, render_stateless)
}
