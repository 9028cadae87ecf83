mod cli;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info, Level};

use cli::Args;
use playseq::oeis;
use playseq::ports::{self, MidiInputSource, MidiOutputSink, PortChoice};
use playseq::sequence::{self, SequenceSource};
use playseq::{PlayConfig, RemapEngine, RunResult, StopSignal};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.list_ports {
        return print_ports();
    }

    let config = match &args.config {
        Some(path) => PlayConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PlayConfig::default(),
    };
    let config = args.apply(config);

    // Everything that can be rejected is checked before a port is opened.
    let sequence = load_sequence(&args)?;
    info!(terms = sequence.len(), "loaded sequence");
    debug!("data starts with {:?}", sequence.head(10));
    let settings = config.settings(sequence.len())?;
    let mut engine = RemapEngine::new(sequence, settings)?;

    let stop = StopSignal::new();
    let stop_for_ctrlc = stop.clone();
    ctrlc::set_handler(move || stop_for_ctrlc.stop()).context("installing Ctrl-C handler")?;

    let inbound = MidiInputSource::open(
        &PortChoice::from_args(config.input_port.as_deref(), args.choose_ports),
        stop.clone(),
    )?;
    let outbound = MidiOutputSink::open(&PortChoice::from_args(
        config.output_port.as_deref(),
        args.choose_ports,
    ))?;
    println!("Playing from {} to {}. Press Ctrl+C to stop.", inbound.name(), outbound.name());

    match engine.run(inbound, outbound, &stop) {
        RunResult::ChannelError(e) => Err(e).context("MIDI session ended"),
        result => {
            debug!(?result, "session over");
            Ok(())
        }
    }
}

fn load_sequence(args: &Args) -> anyhow::Result<SequenceSource> {
    if let Some(values) = &args.values {
        return sequence::parse_value_list(values).context("reading --values");
    }
    let entry = match (&args.search, &args.entry) {
        (Some(query), _) => search_entry(query)?,
        (None, Some(entry)) => entry.clone(),
        (None, None) => bail!("need an ENTRY (e.g. A000045), --search or --values"),
    };
    let path = resolve_entry(&entry, &args.data_dir);
    if path.is_file() {
        return sequence::load_b_file(&path)
            .with_context(|| format!("reading b-file {}", path.display()));
    }
    let Some(number) = sequence::entry_number(&entry) else {
        bail!("'{entry}' is neither a b-file nor an OEIS entry id");
    };
    info!(url = %oeis::b_file_url(number), "fetching b-file");
    oeis::fetch_b_file(number).with_context(|| format!("fetching {}", oeis::b_file_url(number)))
}

/// The id of the first OEIS hit for `query`.
fn search_entry(query: &str) -> anyhow::Result<String> {
    let hits = oeis::search(query).with_context(|| format!("searching OEIS for '{query}'"))?;
    for hit in &hits {
        debug!("{} {}", hit.id(), hit.name);
    }
    let Some(first) = hits.first() else {
        bail!("OEIS search for '{query}' found nothing");
    };
    info!(entry = %first.id(), name = %first.name, "using first search result");
    Ok(first.id())
}

/// An existing file is used as is; otherwise an OEIS id names a b-file in `data_dir`.
fn resolve_entry(entry: &str, data_dir: &Path) -> PathBuf {
    let as_path = Path::new(entry);
    if as_path.is_file() {
        return as_path.to_path_buf();
    }
    match sequence::b_file_name(entry) {
        Some(name) => data_dir.join(name),
        None => as_path.to_path_buf(),
    }
}

fn print_ports() -> anyhow::Result<()> {
    println!("MIDI input ports");
    for (i, name) in ports::list_input_ports()?.iter().enumerate() {
        println!("{}) {}", i + 1, name);
    }
    println!("MIDI output ports");
    for (i, name) in ports::list_output_ports()?.iter().enumerate() {
        println!("{}) {}", i + 1, name);
    }
    Ok(())
}
