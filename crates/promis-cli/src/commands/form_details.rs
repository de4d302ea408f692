//! The `promis form-details` command.

use anyhow::Result;

use promis_client::PromisClient;
use promis_core::render::render_form_details;

use crate::Cli;

pub async fn execute(cli: &Cli, form_oid: &str, format: &str) -> Result<()> {
    let config = cli.resolve_config()?;
    let client = PromisClient::new(&config)?;

    let data = client.form_details(form_oid).await?;
    super::print_response(&data, format, render_form_details)
}
