pub fn get_bit_u32(input: u32, digit: u8) -> bool {
    if digit < 32 {
        input & (1u32 << (digit as u32)) != 0
    } else {
        false
    }
}

pub fn set_bit_u32(int: &mut u32, digit: u8, value: bool) {
    if digit >= 32 {
        return;
    }
    if value {
        *int |= 1u32 << (digit as u32);
    } else {
        *int &= !(1u32 << (digit as u32));
    }
}

pub fn u32_to_u8_array(x: u32) -> [u8; 4] {
    x.to_le_bytes()
}

pub fn u8_array_to_u32(data: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*data)
}

pub fn u64_to_u8_array(x: u64) -> [u8; 8] {
    x.to_le_bytes()
}

pub fn u8_array_to_u64(data: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*data)
}
