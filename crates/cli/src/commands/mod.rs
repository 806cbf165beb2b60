pub mod doctor;
pub mod quote;
pub mod zips;

pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}
