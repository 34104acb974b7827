//! Print the declared schema

use anyhow::Result;

use crate::schema::Schema;

/// Print the SDL of every declared type
pub fn run() -> Result<()> {
    let schema = Schema::core();
    schema.validate()?;
    println!("{}", schema.sdl());
    Ok(())
}
