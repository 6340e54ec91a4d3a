//! # Reading and Writing Instance Files
//!
//! Helpers for file-based input and output of instances. The actual format
//! support lives in the submodules.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};

pub mod dimacs;

/// Opens a file for reading
pub fn open_input_file<P: AsRef<Path>>(path: P) -> Result<BufReader<File>, io::Error> {
    Ok(BufReader::new(File::open(path)?))
}

/// Opens a file for buffered writing
pub fn open_output_file<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>, io::Error> {
    Ok(BufWriter::new(File::create(path)?))
}
