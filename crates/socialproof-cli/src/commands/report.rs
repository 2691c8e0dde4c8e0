use std::path::Path;

use anyhow::Result;

use reporting::human::human_summary;
use reporting::json::render_json;
use reporting::writer::read_result;

pub fn execute(input: &Path, json: bool) -> Result<()> {
    let result = read_result(input)?;
    if json {
        println!("{}", render_json(&result)?);
    } else {
        println!("{}", human_summary(&result));
    }
    Ok(())
}
