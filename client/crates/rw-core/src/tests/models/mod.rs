mod access;
mod credentials;
mod identity;
mod role;
