use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use filemgr_fs::{FileStatus, Md5Sum};
use filemgr_protocol::{Reply, ReplyData, ReplyStatus};
use serde_json::{Map, Value, json};

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub color: ColorChoice,
}

/// Renders an agent reply for the user.
pub trait ReplyPrinter {
    fn print_reply(&mut self, action: &str, reply: &Reply) -> io::Result<()>;
}

/// `0` for the epoch sentinel, otherwise local time like `2024-01-31 12:00:00 +0100`.
fn format_time(t: SystemTime) -> String {
    if t == UNIX_EPOCH {
        return "0".to_owned();
    }
    DateTime::<Local>::from(t)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}

/// Status fields in reply order, rendered as display strings.
fn status_fields(st: &FileStatus) -> [(&'static str, String); 15] {
    [
        ("name", st.name.clone()),
        ("output", st.output.clone()),
        ("type", st.kind.to_string()),
        ("mode", st.mode.clone()),
        ("present", u8::from(st.present).to_string()),
        ("size", st.size.to_string()),
        ("mtime", format_time(st.mtime)),
        ("ctime", format_time(st.ctime)),
        ("atime", format_time(st.atime)),
        ("mtime_seconds", st.mtime_seconds.to_string()),
        ("ctime_seconds", st.ctime_seconds.to_string()),
        ("atime_seconds", st.atime_seconds.to_string()),
        ("md5", st.md5.to_string()),
        ("uid", st.uid.to_string()),
        ("gid", st.gid.to_string()),
    ]
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        // Generic writers cannot be probed for a TTY; Auto means no color.
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            use_color,
        }
    }

    #[inline]
    fn format_path(&self, path: &str) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", path)
        } else {
            path.to_owned()
        }
    }

    fn print_status(&mut self, st: &FileStatus) -> io::Result<()> {
        for (key, value) in status_fields(st).iter() {
            writeln!(self.out, "{:>13}: {}", key, value)?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> ReplyPrinter for HumanPrinter<W, E> {
    fn print_reply(&mut self, action: &str, reply: &Reply) -> io::Result<()> {
        if reply.status == ReplyStatus::Aborted {
            return writeln!(self.err, "[{action}] failed: {}", reply.statusmsg);
        }

        match &reply.data {
            ReplyData::None => {
                if action != "touch" {
                    writeln!(self.out, "{}", reply.statusmsg)?;
                }
            }
            ReplyData::Pong => writeln!(self.out, "pong")?,
            ReplyData::Files(files) => {
                for f in files {
                    let path = self.format_path(f);
                    writeln!(self.out, "{path}")?;
                }
            }
            ReplyData::DetailedFiles(files) => {
                for (path, st) in files {
                    let path = self.format_path(path);
                    writeln!(
                        self.out,
                        "{:<9} {:>7} {:>10} {:<32} {}",
                        st.kind, st.mode, st.size, st.md5, path
                    )?;
                }
            }
            ReplyData::Status(st) => self.print_status(st)?,
        }

        Ok(())
    }
}

pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl JsonPrinter<io::Stdout> {
    /// Create a printer that writes to stdout.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

fn time_json(t: SystemTime) -> Value {
    if t == UNIX_EPOCH {
        json!(0)
    } else {
        json!(DateTime::<Local>::from(t).to_rfc3339())
    }
}

/// Flat JSON object of every status field, sentinels rendered as `0`.
pub fn status_json(st: &FileStatus) -> Value {
    let md5 = match &st.md5 {
        Md5Sum::NotComputed => json!(0),
        Md5Sum::Hex(h) => json!(h),
    };

    json!({
        "name": st.name,
        "output": st.output,
        "type": st.kind.as_str(),
        "mode": st.mode,
        "present": u8::from(st.present),
        "size": st.size,
        "mtime": time_json(st.mtime),
        "ctime": time_json(st.ctime),
        "atime": time_json(st.atime),
        "mtime_seconds": st.mtime_seconds,
        "ctime_seconds": st.ctime_seconds,
        "atime_seconds": st.atime_seconds,
        "md5": md5,
        "uid": st.uid,
        "gid": st.gid,
    })
}

fn data_json(data: &ReplyData) -> Value {
    match data {
        ReplyData::None => json!({}),
        ReplyData::Pong => json!({ "pong": true }),
        ReplyData::Files(files) => json!({ "files": files }),
        ReplyData::DetailedFiles(files) => {
            let entries: Vec<Value> = files
                .iter()
                .map(|(path, st)| {
                    let mut entry = Map::new();
                    entry.insert(path.clone(), status_json(st));
                    Value::Object(entry)
                })
                .collect();
            json!({ "files": entries })
        }
        ReplyData::Status(st) => status_json(st),
    }
}

impl<W: Write> ReplyPrinter for JsonPrinter<W> {
    fn print_reply(&mut self, action: &str, reply: &Reply) -> io::Result<()> {
        let obj = json!({
            "action": action,
            "statuscode": reply.status.code(),
            "statusmsg": reply.statusmsg,
            "data": data_json(&reply.data),
        });
        writeln!(self.out, "{}", obj)
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
