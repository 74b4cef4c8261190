use serde::Serialize;

/// Print `value` as JSON on stdout
///
/// Pretty output uses a 2-space indent. Keys come out sorted because every
/// map printed here is ordered.
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    println!("{}", to_json(value, pretty)?);
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
