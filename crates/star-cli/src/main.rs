use std::path::{Path, PathBuf};

use serde::Serialize;
use starflow::star_domain::{CalibrationData, SputteringTarget};
use starflow::{calibrate, load_json, load_run, synthesize_run, AppConfig, AppError};

const USAGE_SYNTHESIZE: &str = "Uso: star-cli synthesize --run <FILE> [--store <DIR>] [--out <FILE>]";
const USAGE_CALIBRATE: &str =
    "Uso: star-cli calibrate --calibration <FILE> --run <FILE> [--target <FILE>] [--store <DIR>] [--out <FILE>]";

fn main() {
    // Cargar .env si existe para obtener STAR_STORE_DIR / STAR_UPLOAD_ID
    let _ = dotenvy::dotenv();
    // CLI mínima: `star-cli synthesize ...` | `star-cli calibrate ...`
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");
    let flags = parse_flags(&args[args.len().min(2)..]);

    match command {
        "synthesize" => {
            let Some(run_path) = flag(&flags, "--run") else {
                eprintln!("{USAGE_SYNTHESIZE}");
                std::process::exit(2);
            };
            let cfg = config_or_exit("synthesize", &flags);
            let run = or_exit("synthesize", load_run(Path::new(run_path)));
            let report = or_exit("synthesize", synthesize_run(&cfg, run));
            for w in &report.warnings {
                eprintln!("[star synthesize] warning: {w:?}");
            }
            write_output("synthesize", flag(&flags, "--out"), &report);
            println!("[star synthesize] run='{}' created={} reused={} samples={} fingerprint={}",
                     report.run.name,
                     report.created.len(),
                     report.reused.len(),
                     report.samples.len(),
                     report.run_fingerprint);
        }
        "calibrate" => {
            let (Some(cal_path), Some(run_path)) = (flag(&flags, "--calibration"), flag(&flags, "--run")) else {
                eprintln!("{USAGE_CALIBRATE}");
                std::process::exit(2);
            };
            let cfg = config_or_exit("calibrate", &flags);
            let calibration: CalibrationData = or_exit("calibrate", load_json(Path::new(cal_path)));
            let run = or_exit("calibrate", load_run(Path::new(run_path)));
            let target: Option<SputteringTarget> =
                flag(&flags, "--target").map(|p| or_exit("calibrate", load_json(Path::new(p))));
            let report = or_exit("calibrate", calibrate(&cfg, calibration, run, target));
            for w in &report.warnings {
                eprintln!("[star calibrate] warning: {w:?}");
            }
            write_output("calibrate", flag(&flags, "--out"), &report);
            println!("[star calibrate] calibration={} rate={:?}", report.reference.name, report.deposition_rate);
        }
        _ => {
            eprintln!("star-cli: use 'synthesize' or 'calibrate' subcommands");
            eprintln!("{USAGE_SYNTHESIZE}");
            eprintln!("{USAGE_CALIBRATE}");
            std::process::exit(2);
        }
    }
}

/// Pares `--flag valor`; un flag sin valor se ignora.
fn parse_flags(rest: &[String]) -> Vec<(String, String)> {
    let mut flags = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        if rest[i].starts_with("--") && i + 1 < rest.len() {
            flags.push((rest[i].clone(), rest[i + 1].clone()));
            i += 1;
        }
        i += 1;
    }
    flags
}

fn flag<'a>(flags: &'a [(String, String)], name: &str) -> Option<&'a str> {
    flags.iter().rev().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

fn config_or_exit(cmd: &str, flags: &[(String, String)]) -> AppConfig {
    let cfg = or_exit(cmd, AppConfig::from_env());
    match flag(flags, "--store") {
        Some(dir) => cfg.with_store_dir(PathBuf::from(dir)),
        None => cfg,
    }
}

fn or_exit<T>(cmd: &str, result: Result<T, AppError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[star {cmd}] error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn write_output<T: Serialize>(cmd: &str, out: Option<&str>, value: &T) {
    let text = match serde_json::to_string_pretty(value) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[star {cmd}] error: {e}");
            std::process::exit(5);
        }
    };
    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, text) {
                eprintln!("[star {cmd}] error escribiendo {path}: {e}");
                std::process::exit(5);
            }
        }
        None => println!("{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_are_paired_and_last_wins() {
        let flags = parse_flags(&args(&["--run", "a.json", "--store", "x", "--store", "y", "--out"]));
        assert_eq!(flag(&flags, "--run"), Some("a.json"));
        assert_eq!(flag(&flags, "--store"), Some("y"));
        assert_eq!(flag(&flags, "--out"), None);
    }
}
