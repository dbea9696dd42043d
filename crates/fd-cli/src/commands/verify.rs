use std::path::Path;

use colored::Colorize;

use fd_core::{Transcript, verify_hex};

pub fn run_single(key: &str, value: u32, hmac: &str) -> Result<(), String> {
    let ok = verify_hex(key, value, hmac).map_err(|e| e.to_string())?;
    report("reveal", ok);
    if ok {
        Ok(())
    } else {
        Err("commitment does not match key and value".into())
    }
}

pub fn run_transcript(path: &Path) -> Result<(), String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let transcript = Transcript::from_json(&json).map_err(|e| e.to_string())?;
    if transcript.is_empty() {
        println!("  Transcript has no entries.");
        return Ok(());
    }

    let verdicts = transcript.verify_all().map_err(|e| e.to_string())?;
    let failed = verdicts.iter().filter(|(_, ok)| !ok).count();
    for (label, ok) in &verdicts {
        report(label, *ok);
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(format!(
            "{failed} of {} entries failed verification",
            verdicts.len()
        ))
    }
}

fn report(label: &str, ok: bool) {
    if ok {
        println!("  {} {label}", "OK".green().bold());
    } else {
        println!("  {} {label}", "MISMATCH".red().bold());
    }
}
