//! The `promis list-forms` command.

use anyhow::Result;

use promis_client::PromisClient;
use promis_core::render::render_form_list;

use crate::Cli;

pub async fn execute(cli: &Cli, format: &str) -> Result<()> {
    let config = cli.resolve_config()?;
    let client = PromisClient::new(&config)?;

    let data = client.list_forms().await?;
    super::print_response(&data, format, render_form_list)
}
