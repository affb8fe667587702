mod common;

mod confirm_company;
mod errors;
