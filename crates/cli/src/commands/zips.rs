use lanequote_core::geo::GeocodeTable;

pub fn run() -> String {
    let table = GeocodeTable::builtin();
    let mut lines: Vec<String> = table
        .postal_codes()
        .into_iter()
        .filter_map(|code| {
            table
                .lookup(code)
                .map(|location| format!("{code}  {}, {}", location.city, location.state_code))
        })
        .collect();
    lines.push(format!("{} postal codes known", table.len()));
    lines.join("\n")
}
