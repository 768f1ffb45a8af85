//! JSONL writer for batch results.

use crate::metrics::GameMetrics;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct OutputWriter {
    writer: Box<dyn Write + Send>,
    path: PathBuf,
    games: u32,
}

impl OutputWriter {
    pub fn new(output_dir: &Path, compress: bool) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(output_dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");
        let filename = format!("games_{timestamp}.jsonl");

        let (writer, path): (Box<dyn Write + Send>, PathBuf) = if compress {
            let path = output_dir.join(format!("{filename}.gz"));
            let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
            (Box::new(BufWriter::new(encoder)), path)
        } else {
            let path = output_dir.join(filename);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)?;
            (Box::new(BufWriter::new(file)), path)
        };

        Ok(Self {
            writer,
            path,
            games: 0,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        self.games += 1;
        Ok(())
    }

    /// Flushes and closes the file; a gzip stream gets its trailer here.
    pub fn finish(mut self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.writer.flush()?;
        drop(self.writer);
        Ok(self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn games_written(&self) -> u32 {
        self.games
    }
}
