mod io_utils;
mod progress;
mod readers;

pub use io_utils::{create_dataset_writer, create_writer, ensure_output_dir};
#[cfg(test)]
pub use progress::testing;
pub use progress::{BarProgress, NoProgress, Progress};
pub use readers::{open_list_reader, open_text_reader, read_path_list, STDIN_TOKEN};

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
