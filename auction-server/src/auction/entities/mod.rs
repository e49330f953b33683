mod auction;
mod capacity;
mod expiration;

pub use {
    auction::*,
    capacity::*,
    expiration::*,
};
