//! SB/SC (0xFF01/0xFF02): minimal stub so games that poke the serial port
//! don't corrupt unrelated state. No link cable is emulated.

pub struct SerialPort {
    sb: u8,
    sc: u8,
}

impl SerialPort {
    pub fn new() -> SerialPort {
        SerialPort { sb: 0, sc: 0x7E }
    }

    pub fn read_sb(&self) -> u8 {
        self.sb
    }

    pub fn write_sb(&mut self, val: u8) {
        self.sb = val;
    }

    pub fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub fn write_sc(&mut self, val: u8) {
        log::info!("serial control write {:#04x} (no link cable emulated)", val);
        self.sc = val;
    }
}

impl Default for SerialPort {
    fn default() -> SerialPort {
        SerialPort::new()
    }
}
