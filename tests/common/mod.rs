use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 8] = [
    "op",
    "caller",
    "id",
    "receiver",
    "amount",
    "payer_name",
    "receiver_name",
    "message",
];

pub const SENDER: &str = "0x1111111111111111111111111111111111111111";
pub const RECEIVER: &str = "0x2222222222222222222222222222222222222222";
pub const OUTSIDER: &str = "0x3333333333333333333333333333333333333333";

/// Writes `payments` create rows, each followed by one chat row.
pub fn generate_csv(path: &Path, payments: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=payments {
        wtr.write_record([
            "create", SENDER, "", RECEIVER, "1.0", "Alice", "Bob", "Hello",
        ])?;
        let id = i.to_string();
        wtr.write_record(["chat", RECEIVER, id.as_str(), "", "", "", "", "Hi"])?;
    }

    wtr.flush()?;
    Ok(())
}
