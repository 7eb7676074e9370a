//! The standard service command line.
//!
//! Use [`CommandLine`] directly through
//! [`provide_default`](crate::provide_default), or embed it in an
//! application-specific struct:
//!
//! ```rust
//! use clap::Parser;
//! use clapwire::CommandLine;
//!
//! #[derive(Debug, Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     common: CommandLine,
//!
//!     /// Address to listen on.
//!     #[arg(long, default_value = ":8080")]
//!     listen: String,
//! }
//!
//! let cli = Cli::try_parse_from(["svc", "--pprof", "--listen", ":9000"]).unwrap();
//! assert!(cli.common.pprof);
//! assert_eq!(cli.listen, ":9000");
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// Flags shared by every service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser, Serialize)]
pub struct CommandLine {
    /// Sets the location of the application's configuration file, overriding the search path.
    #[arg(short = 'f', long)]
    pub config_file: Option<PathBuf>,

    /// Shuts off the health endpoint.
    #[arg(long)]
    pub no_health: bool,

    /// Turns on the pprof endpoint.
    #[arg(long)]
    pub pprof: bool,
}
