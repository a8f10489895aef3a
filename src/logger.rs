use crate::config::LogLevel;
use anyhow::Result;
use simple_logger::SimpleLogger;

pub fn init(level: &LogLevel) -> Result<()> {
    SimpleLogger::new().with_level(level.filter()?).init()?;

    Ok(())
}
