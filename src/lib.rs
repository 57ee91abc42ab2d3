pub mod service {
    pub mod command;
    pub mod config_service;
    pub mod file;
    pub mod stats;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod facade {
    pub mod batch_facade;
    pub mod traits {
        pub mod i_batch;
    }
}

pub mod models {
    pub mod batch;
    pub mod stats;
    pub mod template;
    pub mod work_item;
}

pub mod utils {
    pub mod utils;
}
