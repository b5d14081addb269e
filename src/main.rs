mod app;
mod browser;
mod config;
mod deck;
mod ledger;
mod mpris;
mod resource;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
