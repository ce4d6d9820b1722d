pub mod tally_server;
