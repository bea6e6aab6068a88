use std::{
    fs::File,
    io::{self, BufWriter, Read, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use rgn_stats::{descriptive::DescriptiveStats, normalizer::NormalizedValues, trafo_map::TrafoMap};

/// Path argument meaning "read from stdin".
const STDIN_PATH: &str = "-";

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::info!("Wrote {}", output.display_path());
        Ok(())
    }

    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path.to_path_buf()),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {file_kind} from stdin"))?;
        return serde_json::from_str(&buf)
            .with_context(|| format!("Failed to parse {file_kind} JSON from stdin"));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a sample of raw feature values (a JSON array of numbers)
///
/// # Errors
///
/// Returns error if the input cannot be opened or parsed
pub fn read_values_file<P>(path: P) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let values: Vec<f64> = read_json_file("values", path)?;
    tracing::info!("Read {} values", values.len());
    Ok(values)
}

/// Read a fitted transformation map (a JSON array of `[key, value]` pairs)
///
/// # Errors
///
/// Returns error if the input cannot be opened or parsed, or if its keys are
/// not strictly increasing
pub fn read_trafo_map_file<P>(path: P) -> anyhow::Result<TrafoMap>
where
    P: AsRef<Path>,
{
    let map: TrafoMap = read_json_file("transformation map", path)?;
    tracing::info!("Loaded transformation map with {} entries", map.len());
    Ok(map)
}

/// Log descriptive statistics of normalized output
pub fn log_output_summary(output: &NormalizedValues) {
    let Some(stats) = DescriptiveStats::new(output.to_f64_vec()) else {
        tracing::info!("Output is empty");
        return;
    };
    tracing::info!(
        count = stats.count,
        min = format_args!("{:.4}", stats.min),
        max = format_args!("{:.4}", stats.max),
        mean = format_args!("{:.4}", stats.mean),
        median = format_args!("{:.4}", stats.median),
        std_dev = format_args!("{:.4}", stats.std_dev),
        "Normalized output summary"
    );
}
