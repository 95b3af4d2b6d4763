pub mod transport;

use std::io;
use std::process::ExitCode;

use clap::{Args, Subcommand};
use filemgr_protocol::{AgentRequest, ReplyStatus};

use crate::printer::{ColorChoice, HumanPrinter, JsonPrinter, PrinterConfig, ReplyPrinter};
pub use transport::TransportOptions;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a file or refresh its timestamps.
    ///
    /// Without FILE the configured `filemgr.touch_file` is used, falling
    /// back to /var/run/mcollective.plugin.filemgr.touch.
    Touch(FileArgs),

    /// Remove a file.
    Remove(FileArgs),

    /// List the entries of a directory.
    ///
    /// Example:
    ///   filemgr list /etc
    ///   filemgr list --details /var/log
    List(ListArgs),

    /// Show the status of a file.
    Status(FileArgs),

    /// Check that the agent answers.
    Ping,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Target file (optional, see `touch --help`)
    pub file: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list
    pub dir: String,

    /// Include the status of every entry
    #[arg(long, short = 'd')]
    pub details: bool,
}

impl Command {
    pub fn into_request(self) -> AgentRequest {
        match self {
            Command::Touch(a) => AgentRequest::Touch { file: a.file },
            Command::Remove(a) => AgentRequest::Remove { file: a.file },
            Command::List(a) => AgentRequest::List {
                dir: a.dir,
                details: Some(a.details),
            },
            Command::Status(a) => AgentRequest::Status { file: a.file },
            Command::Ping => AgentRequest::Ping,
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output the reply as a single JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto", global = true)]
    pub color: String,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn ReplyPrinter> {
        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        if self.json {
            Box::new(JsonPrinter::stdout())
        } else {
            Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(PrinterConfig { color }))
        }
    }
}

/// Send `request`, print the reply, and map its status to an exit code.
///
/// 0 = ok, 1 = the action failed, 2 = the agent could not be reached.
pub fn run(request: AgentRequest, transport: &TransportOptions, output: &OutputOptions) -> ExitCode {
    let reply = match transport.send(&request) {
        Ok(reply) => reply,
        Err(e) => {
            eprintln!("[error] {e:#}");
            return ExitCode::from(2);
        }
    };

    let mut printer = output.make_printer();
    if let Err(e) = printer.print_reply(request.action(), &reply) {
        eprintln!("[error] failed to print reply: {e}");
        return ExitCode::from(2);
    }

    match reply.status {
        ReplyStatus::Ok => ExitCode::from(0),
        ReplyStatus::Aborted => ExitCode::from(1),
    }
}
