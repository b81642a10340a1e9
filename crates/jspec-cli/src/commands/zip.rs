//! Handler for `jspec zip`.

use std::path::PathBuf;

use miette::Result;

use jspec_ops::ops_zip::{self, ZipOptions};
use jspec_ops::Settings;
use jspec_util::errors::JspecError;

pub fn exec(settings: &Settings, require: String, output: PathBuf) -> Result<()> {
    if output.is_dir() {
        return Err(JspecError::Archive {
            message: format!("Output {} is a directory", output.display()),
        }
        .into());
    }
    ops_zip::zip(settings, &ZipOptions { require, output })
}
