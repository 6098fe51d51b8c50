use crate::utils::{get_bit_u32, set_bit_u32};

/// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#op-query
pub const TAILABLE_CURSOR_BIT: u8 = 1;
pub const SLAVE_OK_BIT: u8 = 2;
pub const OPLOG_REPLAY_BIT: u8 = 3;
pub const NO_CURSOR_TIMEOUT_BIT: u8 = 4;
pub const AWAIT_DATA_BIT: u8 = 5;
pub const EXHAUST_BIT: u8 = 6;
pub const PARTIAL_BIT: u8 = 7;

/// True iff the slaveOk bit of an OP_QUERY flags field is set.
pub fn bit_to_metadata(flags: u32) -> bool {
    get_bit_u32(flags, SLAVE_OK_BIT)
}

/// Sets or clears the slaveOk bit, leaving every other bit as it was.
pub fn metadata_to_bit(secondary_ok: bool, flags: u32) -> u32 {
    let mut result = flags;
    set_bit_u32(&mut result, SLAVE_OK_BIT, secondary_ok);
    result
}

/// OP_QUERY option bits. Unknown and reserved bits are carried verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QueryFlags(u32);

impl QueryFlags {
    pub fn from_bits(bits: u32) -> QueryFlags {
        QueryFlags(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn tailable_cursor(self) -> bool {
        get_bit_u32(self.0, TAILABLE_CURSOR_BIT)
    }

    pub fn secondary_ok(self) -> bool {
        bit_to_metadata(self.0)
    }

    pub fn with_secondary_ok(self, secondary_ok: bool) -> QueryFlags {
        QueryFlags(metadata_to_bit(secondary_ok, self.0))
    }

    pub fn oplog_replay(self) -> bool {
        get_bit_u32(self.0, OPLOG_REPLAY_BIT)
    }

    pub fn no_cursor_timeout(self) -> bool {
        get_bit_u32(self.0, NO_CURSOR_TIMEOUT_BIT)
    }

    pub fn await_data(self) -> bool {
        get_bit_u32(self.0, AWAIT_DATA_BIT)
    }

    pub fn exhaust(self) -> bool {
        get_bit_u32(self.0, EXHAUST_BIT)
    }

    pub fn partial(self) -> bool {
        get_bit_u32(self.0, PARTIAL_BIT)
    }
}

impl From<u32> for QueryFlags {
    fn from(bits: u32) -> QueryFlags {
        QueryFlags(bits)
    }
}

impl From<QueryFlags> for u32 {
    fn from(flags: QueryFlags) -> u32 {
        flags.0
    }
}
