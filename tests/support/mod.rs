#![allow(dead_code)]

pub mod fraudform_env;
pub mod mock_server;
