//! Generate the RSS feed

use anyhow::Result;
use std::path::Path;

use crate::Site;

/// Write the feed to a file, or print it when `output` is `-`
pub fn run(site: &Site, output: Option<&Path>) -> Result<()> {
    if output == Some(Path::new("-")) {
        print!("{}", crate::feed::render(site));
        return Ok(());
    }

    let path = crate::feed::write(site, output)?;
    println!("Wrote {}", path.display());
    Ok(())
}
