use std::fmt::Write;

/// Format queue time as zero-padded MM:SS. Minutes keep counting past 59.
pub fn format_mm_ss(total_secs: u32) -> String {
    let mut out = String::with_capacity(5);
    write_mm_ss(&mut out, total_secs);
    out
}

pub fn write_mm_ss(buf: &mut String, total_secs: u32) {
    buf.clear();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let _ = write!(buf, "{minutes:02}:{seconds:02}");
}
