use miette::Result;

use jspec_ops::{ops_list, Settings};

pub fn exec(settings: &Settings, filter: Option<&str>) -> Result<()> {
    ops_list::list(settings, filter)
}
