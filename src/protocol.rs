use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::channel::ChannelError;
use crate::command::FingerCommand;

pub(crate) const HEADER: [u8; 2] = [0xFF, 0xFF];

pub(crate) fn calc_checksum(payload: &[u8]) -> u8 {
    let mut sum: u8 = 0;
    for b in payload {
        sum = sum.wrapping_add(*b);
    }
    !sum
}

pub(crate) fn serialize(command: &FingerCommand) -> Vec<u8> {
    let mut data = vec![
        HEADER[0], // header
        HEADER[1],
        command.finger.index(), // finger
        command.angle.degrees(), // degrees
    ];
    let checksum = calc_checksum(&data[2..]);
    data.push(checksum);
    data
}

/// Fixed-size move frame written to the hand's serial link.
pub(crate) struct HandProtocol;

impl Encoder<FingerCommand> for HandProtocol {
    type Error = ChannelError;

    fn encode(&mut self, command: FingerCommand, buf: &mut BytesMut) -> Result<(), ChannelError> {
        let msg = serialize(&command);
        buf.reserve(msg.len());
        buf.put(msg.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::finger::Finger;

    #[test]
    fn checksum_is_inverted_sum() {
        assert_eq!(calc_checksum(&[0x01, 0x02, 0x01]), 0xFB);
        assert_eq!(calc_checksum(&[0xFF, 0x01]), 0xFF);
    }

    #[test]
    fn move_serialization() {
        let command = FingerCommand::new(Finger::Thumb, Angle::new(90).unwrap());
        assert_eq!(serialize(&command), vec![0xFF, 0xFF, 0x00, 90, 0xA5]);
        let command = FingerCommand::new(Finger::Pinky, Angle::new(180).unwrap());
        assert_eq!(serialize(&command), vec![0xFF, 0xFF, 0x04, 180, 0x47]);
    }

    #[test]
    fn encoder_appends_frames() {
        let mut codec = HandProtocol;
        let mut buf = BytesMut::new();
        codec
            .encode(FingerCommand::new(Finger::Index, Angle::new(45).unwrap()), &mut buf)
            .unwrap();
        codec
            .encode(FingerCommand::new(Finger::Ring, Angle::new(0).unwrap()), &mut buf)
            .unwrap();
        assert_eq!(buf.len(), 10);
        assert_eq!(&buf[..], &[0xFF, 0xFF, 1, 45, 0xD1, 0xFF, 0xFF, 3, 0, 0xFC][..]);
    }
}
