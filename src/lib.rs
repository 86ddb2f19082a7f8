
pub mod core {
    pub mod aggregator;
    pub mod config;
    pub mod error;
    pub mod runner;
    pub mod test;
}


pub mod replay;
pub mod reporters;
