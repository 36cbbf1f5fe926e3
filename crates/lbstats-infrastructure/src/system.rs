//! Host load average via sysinfo

use lbstats_application::ports::infrastructure::{LoadAverage, SystemLoadProvider};
use sysinfo::System;

/// Reads the load average of the machine this process runs on
///
/// Platforms without a load average (Windows) report zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoLoadProvider;

impl SystemLoadProvider for SysinfoLoadProvider {
    fn load_average(&self) -> LoadAverage {
        let load = System::load_average();
        LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        }
    }
}
