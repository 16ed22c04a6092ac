//! Regenerate `src/scripts.rs` from the `--help` output of every script
//!
//! Run from the repository root after `cargo build`:
//!
//! ```plain
//! $ cargo run -p make-docs > src/scripts.rs
//! ```

use std::process::{self, Command};

struct Script {
    name: &'static str,
    about: &'static str,
}

const SCRIPTS: &[Script] = &[
    Script {
        name: "check-meminfo",
        about: "Linux-only. Reads /proc/meminfo.",
    },
    Script {
        name: "meminfo-graph",
        about: "Cross platform, only renders text for rrdtool.",
    },
];

fn main() {
    let preamble = "Documentation about the various scripts contained herein\n";

    let mut out: String = cp(preamble.split('\n'));
    out.push_str("\n");
    out.push_str(&cp(SCRIPTS.iter().map(|s| format!("- [{0}](#{0})", s.name))));
    out.push_str("\n");
    for script in SCRIPTS {
        out.push_str(&format!(
            "\
//!
//! # {0}
//!
//! {1}
//!
//! ```plain
//! $ {0} --help
",
            script.name, script.about
        ));
        match help_text(script.name) {
            Ok(help) => out.push_str(&cp(help.split('\n'))),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        out.push_str("\n//! ```\n");
    }
    out.push_str("\n");
    print!("{}", out);
}

fn help_text(name: &str) -> Result<String, String> {
    let output = Command::new(&format!("target/debug/{}", name))
        .args(&["--help"])
        .output()
        .map_err(|e| format!("Couldn't execute command {}: {}", name, e))?;
    String::from_utf8(output.stdout)
        .map_err(|e| format!("Couldn't convert command {} help to utf8: {}", name, e))
}

/// Comment each line in the iterator
fn cp<S: AsRef<str>, I: Iterator<Item = S>>(s: I) -> String {
    s.map(|s| format!("//! {}", s.as_ref()))
        .map(|s| s.trim().into())
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::cp;

    #[test]
    fn comments_every_line() {
        assert_eq!(cp("a\n\nb".split('\n')), "//! a\n//!\n//! b");
    }
}
