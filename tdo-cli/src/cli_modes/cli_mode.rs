/// Whether a mode handled the command line or the next one should try.
#[derive(Debug)]
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
