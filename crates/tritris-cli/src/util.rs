use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};

use crate::model::linear_model::LinearModel;

/// Where JSON output goes: a file, or stdout when no path is given.
#[derive(Debug)]
pub enum Output {
    Stdout(io::StdoutLock<'static>),
    File(BufWriter<File>),
}

impl Output {
    /// Writes `value` as pretty JSON followed by a newline.
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let target = path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
        let mut output = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {target}"))?;
                Self::File(BufWriter::new(file))
            }
            None => Self::Stdout(io::stdout().lock()),
        };
        serde_json::to_writer_pretty(&mut output, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(output)
            .and_then(|()| output.flush())
            .with_context(|| format!("Failed to finish writing {target}"))
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File(writer) => writer.flush(),
        }
    }
}

fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a trained model written by `tritris train`.
pub fn read_model_file<P>(path: P) -> anyhow::Result<LinearModel>
where
    P: AsRef<Path>,
{
    read_json_file("model", path.as_ref())
}
