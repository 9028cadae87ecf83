use std::path::PathBuf;

use clap::Parser;

use playseq::PlayConfig;

/// Replace the pitches of incoming MIDI notes with the terms of an integer
/// sequence and send the result to an output port.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// OEIS entry id (A000045) or a b-file path; ids without a local bNNNNNN.txt
    /// in --data-dir are fetched from oeis.org
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Search OEIS and play the first result; ENTRY is ignored
    #[arg(long, conflicts_with = "values")]
    pub search: Option<String>,

    /// Comma-separated terms to play instead of a b-file
    #[arg(long, allow_hyphen_values = true, conflicts_with = "entry")]
    pub values: Option<String>,

    /// Directory checked for b-files before fetching
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Loop through the sequence until stopped
    #[arg(long = "loop", conflicts_with = "noloop")]
    pub looping: bool,

    /// Play the sequence once (default)
    #[arg(long)]
    pub noloop: bool,

    /// Reset period when looping, step limit otherwise; 0 means the sequence length
    #[arg(long)]
    pub nstep: Option<usize>,

    /// Terms are reduced modulo this
    #[arg(long, allow_hyphen_values = true)]
    pub pmod: Option<i64>,

    /// Notes are offset by this after the modulo
    #[arg(long, allow_hyphen_values = true)]
    pub poff: Option<i64>,

    /// Play terms as rests: n negatives, z zeros, p positives, e.g. nz
    #[arg(long)]
    pub rest: Option<String>,

    /// Input port name (or part of one)
    #[arg(long)]
    pub iport: Option<String>,

    /// Output port name (or part of one)
    #[arg(long)]
    pub oport: Option<String>,

    /// Ask which port to use when several are available
    #[arg(long, default_value_t = false)]
    pub choose_ports: bool,

    /// Print the available MIDI ports and exit
    #[arg(long, default_value_t = false)]
    pub list_ports: bool,

    /// Path to a TOML config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print diagnostics
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Layers the command-line flags over `base`.
    pub fn apply(&self, mut base: PlayConfig) -> PlayConfig {
        if self.looping {
            base.looping = true;
        } else if self.noloop {
            base.looping = false;
        }
        if let Some(nstep) = self.nstep {
            base.steps = Some(nstep);
        }
        if let Some(pmod) = self.pmod {
            base.modulus = pmod;
        }
        if let Some(poff) = self.poff {
            base.offset = poff;
        }
        if let Some(rest) = &self.rest {
            base.rest = rest.clone();
        }
        if self.iport.is_some() {
            base.input_port = self.iport.clone();
        }
        if self.oport.is_some() {
            base.output_port = self.oport.clone();
        }
        base
    }
}
