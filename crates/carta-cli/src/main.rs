use carta::MapDocument;
use carta::coverage;
use carta::noise;
use carta::reposition;
use carta::rescale;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Carta(carta::Error),
    View(carta_view::Error),
    Json(serde_json::Error),
    EmptyInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Carta(err) => write!(f, "{err}"),
            CliError::View(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::EmptyInput => write!(f, "No drawable path elements found"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<carta::Error> for CliError {
    fn from(value: carta::Error) -> Self {
        Self::Carta(value)
    }
}

impl From<carta_view::Error> for CliError {
    fn from(value: carta_view::Error) -> Self {
        match value {
            carta_view::Error::EmptyInput => Self::EmptyInput,
            other => Self::View(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Clean,
    Sweep,
    Reposition,
    Rescale,
    View,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    out_dir: Option<String>,
    multiplier: f64,
    threshold: f64,
    strip: f64,
    resolution: f64,
    report: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::View,
            input: None,
            out_dir: None,
            multiplier: noise::DEFAULT_MULTIPLIER,
            threshold: coverage::DEFAULT_THRESHOLD,
            strip: reposition::DEFAULT_STRIP_FRACTION,
            resolution: rescale::DEFAULT_TARGET,
            report: false,
        }
    }
}

fn usage() -> &'static str {
    "carta-cli\n\
\n\
USAGE:\n\
  carta-cli clean <in_dir> <out_dir> [--multiplier <f>]\n\
  carta-cli sweep <in_dir> <out_dir> [--threshold <f>] [--report]\n\
  carta-cli reposition <in_dir> <out_dir> [--strip <f>]\n\
  carta-cli rescale <in_dir> <out_dir> [--resolution <n>]\n\
  carta-cli view <file.svg>\n\
\n\
NOTES:\n\
  - Batch commands process every .svg file in <in_dir> and continue past\n\
    per-file failures (reported on stderr).\n\
  - clean drops stray paths far from the geometry's centroid; --multiplier\n\
    widens the distance threshold (default 5.0).\n\
  - sweep quarantines files whose empty-space ratio exceeds --threshold\n\
    (default 0.8): they are copied to <out_dir> and deleted from <in_dir>.\n\
    --report prints a JSON summary to stdout.\n\
  - reposition moves far-left geometry next to the right-most geometry and\n\
    refits the viewBox; --strip is the left-strip fraction (default 0.1).\n\
  - rescale scales geometry so one bounding-box side reaches --resolution\n\
    (default 1000).\n\
  - view opens an interactive window: i/o zoom, arrows pan, q/Esc quit.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut it = argv.iter().skip(1);
    let Some(cmd) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let mut args = Args {
        command: match cmd.as_str() {
            "clean" => Command::Clean,
            "sweep" => Command::Sweep,
            "reposition" => Command::Reposition,
            "rescale" => Command::Rescale,
            "view" => Command::View,
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            _ => return Err(CliError::Usage(usage())),
        },
        ..Default::default()
    };

    let mut positional: Vec<String> = Vec::new();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--report" => args.report = true,
            "--multiplier" => args.multiplier = parse_f64_flag(it.next())?,
            "--threshold" => args.threshold = parse_f64_flag(it.next())?,
            "--strip" => args.strip = parse_f64_flag(it.next())?,
            "--resolution" => args.resolution = parse_f64_flag(it.next())?,
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => positional.push(path.to_string()),
        }
    }

    match args.command {
        Command::View => {
            if positional.len() != 1 {
                return Err(CliError::Usage(usage()));
            }
            args.input = positional.pop();
        }
        _ => {
            if positional.len() != 2 {
                return Err(CliError::Usage(usage()));
            }
            args.out_dir = positional.pop();
            args.input = positional.pop();
        }
    }

    Ok(args)
}

fn parse_f64_flag(value: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    let parsed = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(parsed.is_finite() && parsed > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(parsed)
}

/// Every `.svg` file directly inside `dir`, sorted for deterministic order.
fn svg_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("svg"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn out_path(out_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => out_dir.join(name),
        None => out_dir.join("out.svg"),
    }
}

/// Run `process` over every SVG in the input directory, reporting per-file
/// failures on stderr and carrying on.
fn for_each_svg(
    in_dir: &Path,
    mut process: impl FnMut(&Path) -> Result<(), CliError>,
) -> Result<(), CliError> {
    for file in svg_files(in_dir)? {
        if let Err(err) = process(&file) {
            tracing::warn!(file = %file.display(), error = %err, "skipping file");
            eprintln!("Error processing {}: {err}", file.display());
        }
    }
    Ok(())
}

fn run_clean(in_dir: &Path, out_dir: &Path, multiplier: f64) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;
    for_each_svg(in_dir, |file| {
        let mut doc = match MapDocument::read_file(file) {
            Ok(doc) => doc,
            Err(err) => return Err(err.into()),
        };
        let stats = match noise::clean_document(&mut doc, multiplier) {
            Ok(stats) => stats,
            Err(carta::Error::EmptyDocument) => {
                println!("No paths found in {}. Skipping...", file.display());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        if stats.kept == 0 {
            println!(
                "No paths passed the noise filter for {}. Skipping...",
                file.display()
            );
            return Ok(());
        }
        let out = out_path(out_dir, file);
        doc.write_file(&out)?;
        println!(
            "Processed {} -> {} ({} of {} paths kept)",
            file.display(),
            out.display(),
            stats.kept,
            stats.total
        );
        Ok(())
    })
}

#[derive(Serialize)]
struct SweepEntry {
    file: String,
    empty_space_ratio: f64,
    quarantined: bool,
}

fn run_sweep(
    in_dir: &Path,
    out_dir: &Path,
    threshold: f64,
    report: bool,
) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;
    let mut entries: Vec<SweepEntry> = Vec::new();
    for_each_svg(in_dir, |file| {
        let doc = MapDocument::read_file(file)?;
        let ratio = coverage::empty_space_ratio(&doc);
        let quarantined = ratio > threshold;
        if quarantined {
            // Quarantine keeps the original bytes untouched.
            let out = out_path(out_dir, file);
            std::fs::copy(file, &out)?;
            std::fs::remove_file(file)?;
            println!(
                "Moved and deleted {} -> {} (empty space ratio: {ratio:.2})",
                file.display(),
                out.display()
            );
        } else {
            println!(
                "Retained {} (empty space ratio: {ratio:.2})",
                file.display()
            );
        }
        entries.push(SweepEntry {
            file: file.display().to_string(),
            empty_space_ratio: ratio,
            quarantined,
        });
        Ok(())
    })?;

    if report {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &entries)?;
        println!();
    }
    Ok(())
}

fn run_reposition(in_dir: &Path, out_dir: &Path, strip: f64) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;
    for_each_svg(in_dir, |file| {
        let mut doc = MapDocument::read_file(file)?;
        let stats = match reposition::reposition_document(&mut doc, strip) {
            Ok(stats) => stats,
            Err(carta::Error::EmptyDocument) => {
                println!("No paths found in {}. Skipping...", file.display());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let out = out_path(out_dir, file);
        doc.write_file(&out)?;
        println!(
            "Repositioned {} -> {} ({} of {} paths moved)",
            file.display(),
            out.display(),
            stats.moved,
            stats.total
        );
        Ok(())
    })
}

fn run_rescale(in_dir: &Path, out_dir: &Path, resolution: f64) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;
    for_each_svg(in_dir, |file| {
        let mut doc = MapDocument::read_file(file)?;
        let factor = match rescale::rescale_document(&mut doc, resolution) {
            Ok(factor) => factor,
            Err(carta::Error::EmptyDocument) => {
                println!("No paths found in {}. Skipping...", file.display());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let out = out_path(out_dir, file);
        doc.write_file(&out)?;
        println!(
            "Scaled {} -> {} (factor {factor:.3})",
            file.display(),
            out.display()
        );
        Ok(())
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let input = PathBuf::from(args.input.as_deref().unwrap_or_default());
    match args.command {
        Command::Clean => {
            let out = PathBuf::from(args.out_dir.as_deref().unwrap_or_default());
            run_clean(&input, &out, args.multiplier)
        }
        Command::Sweep => {
            let out = PathBuf::from(args.out_dir.as_deref().unwrap_or_default());
            run_sweep(&input, &out, args.threshold, args.report)
        }
        Command::Reposition => {
            let out = PathBuf::from(args.out_dir.as_deref().unwrap_or_default());
            run_reposition(&input, &out, args.strip)
        }
        Command::Rescale => {
            let out = PathBuf::from(args.out_dir.as_deref().unwrap_or_default());
            run_rescale(&input, &out, args.resolution)
        }
        Command::View => carta_view::view_file(&input).map_err(CliError::from),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::EmptyInput) => {
            eprintln!("{}", CliError::EmptyInput);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, CliError> {
        let argv: Vec<String> = std::iter::once("carta-cli".to_string())
            .chain(list.iter().map(|s| s.to_string()))
            .collect();
        parse_args(&argv)
    }

    #[test]
    fn parses_batch_command_with_flags() {
        let a = args(&["clean", "maps", "cleaned", "--multiplier", "3.5"]).unwrap();
        assert!(matches!(a.command, Command::Clean));
        assert_eq!(a.input.as_deref(), Some("maps"));
        assert_eq!(a.out_dir.as_deref(), Some("cleaned"));
        assert_eq!(a.multiplier, 3.5);
    }

    #[test]
    fn view_takes_exactly_one_path() {
        assert!(args(&["view", "a.svg"]).is_ok());
        assert!(matches!(args(&["view"]), Err(CliError::Usage(_))));
        assert!(matches!(
            args(&["view", "a.svg", "b.svg"]),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn rejects_unknown_flags_and_bad_numbers() {
        assert!(matches!(
            args(&["sweep", "a", "b", "--bogus"]),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            args(&["sweep", "a", "b", "--threshold", "zero"]),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            args(&["sweep", "a", "b", "--threshold", "-1"]),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn missing_command_prints_usage() {
        assert!(matches!(args(&[]), Err(CliError::Usage(_))));
    }
}
