//! The `promis init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("promis.toml").exists() {
        println!("promis.toml already exists, skipping.");
    } else {
        std::fs::write("promis.toml", SAMPLE_CONFIG)?;
        println!("Created promis.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit promis.toml with your registration and token GUIDs");
    println!("     (the defaults are the public Assessment Center demo credentials)");
    println!("  2. Run: promis list-forms --format text");
    println!("  3. Run: promis stateless <FORM_OID> --response ITEM=CHOICE");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# promis configuration
#
# Credentials may also come from the PROMIS_REGISTRATION and
# PROMIS_TOKEN environment variables, or `${VAR}` references here.

registration = "86EBE839-C808-4CD9-B308-8EC79FAB2B76"
token = "2460B692-2B83-463B-88B1-8F353D6698DD"
base_url = "https://www.assessmentcenter.net/ac_api"
api_version = "2014-01"
"#;
