const STEP: f64 = 1024.0;
const UNITS: [&str; 5] = ["octets", "Ko", "Mo", "Go", "To"];

/// Human-scaled size using 1024-based units. Plain bytes are shown as an
/// integer, every larger unit with two decimals; `None` renders as `-`.
pub fn format_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "-".to_string();
    };

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < STEP {
            return if unit == UNITS[0] {
                format!("{} {}", bytes, unit)
            } else {
                format!("{:.2} {}", size, unit)
            };
        }
        size /= STEP;
    }
    format!("{:.2} Po", size)
}
