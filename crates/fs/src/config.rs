/// Read buffer used while hashing file contents.
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;
