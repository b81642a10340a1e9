//! Handler for `jspec detail`.

use miette::Result;

use jspec_ops::ops_detail::{self, DetailOptions};
use jspec_ops::Settings;

pub fn exec(settings: &Settings, require: String, together: bool) -> Result<()> {
    let opts = DetailOptions { require, together };
    ops_detail::detail(settings, &opts)
}
