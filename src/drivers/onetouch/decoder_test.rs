use std::{
    collections::VecDeque,
    error::Error,
    io::{self, Cursor, ErrorKind, Read},
};

use crate::drivers::onetouch::{
    decoder::{DecodeError, ReportDecoder},
    event::{Event, TouchSample},
};

/// Reader that replays a script of chunks and errors, one read per entry
struct ScriptedReader {
    script: VecDeque<io::Result<Vec<u8>>>,
}

impl ScriptedReader {
    fn new(script: Vec<io::Result<Vec<u8>>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.script.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                let len = chunk.len().min(buf.len());
                buf[..len].copy_from_slice(&chunk[..len]);
                if len < chunk.len() {
                    self.script.push_front(Ok(chunk.split_off(len)));
                }
                Ok(len)
            }
        }
    }
}

#[test]
fn test_decode_touch_and_release() -> Result<(), Box<dyn Error>> {
    let bytes = vec![0xff, 0x40, 0x1f, 0x80, 0x3e, 0xff, 0xfe, 0xfe];
    let mut decoder = ReportDecoder::new(Cursor::new(bytes));

    let expected = TouchSample {
        x: 125,
        y: 250,
        x_flags: 0,
        y_flags: 0,
    };
    assert_eq!(decoder.next_event()?, Event::Touch(expected));
    assert_eq!(decoder.next_event()?, Event::Release);

    Ok(())
}

#[test]
fn test_skips_out_of_frame_bytes() -> Result<(), Box<dyn Error>> {
    let bytes = vec![0x00, 0x12, 0xfe, 0xff, 0xfe, 0xfe];
    let mut decoder = ReportDecoder::new(Cursor::new(bytes));

    assert_eq!(decoder.next_event()?, Event::Release);
    assert_eq!(decoder.skipped_bytes(), 3);

    Ok(())
}

#[test]
fn test_reports_flags() -> Result<(), Box<dyn Error>> {
    let bytes = vec![0xff, 0x05, 0x00, 0x00, 0x00];
    let mut decoder = ReportDecoder::new(Cursor::new(bytes));

    let Event::Touch(sample) = decoder.next_event()? else {
        panic!("expected touch event");
    };
    assert!(sample.has_flags());
    assert_eq!(sample.x_flags, 0x05);
    assert_eq!(sample.y_flags, 0x00);

    Ok(())
}

#[test]
fn test_short_frame_is_transport_error() {
    // Marker and X field arrive, but the stream ends before Y
    let bytes = vec![0xff, 0x00, 0x10, 0x00];
    let mut decoder = ReportDecoder::new(Cursor::new(bytes));

    let result = decoder.next_event();
    assert!(matches!(result, Err(DecodeError::TransportEnded(_))));
}

#[test]
fn test_empty_stream_is_transport_error() {
    let mut decoder = ReportDecoder::new(Cursor::new(Vec::new()));
    let result = decoder.next_event();
    assert!(matches!(result, Err(DecodeError::TransportEnded(_))));
}

#[test]
fn test_idle_timeout_keeps_waiting() -> Result<(), Box<dyn Error>> {
    let reader = ScriptedReader::new(vec![
        Err(ErrorKind::TimedOut.into()),
        Err(ErrorKind::TimedOut.into()),
        Ok(vec![0xff, 0xfe, 0xfe]),
    ]);
    let mut decoder = ReportDecoder::new(reader);

    assert_eq!(decoder.next_event()?, Event::Release);

    Ok(())
}

#[test]
fn test_timeout_mid_frame_is_transport_error() {
    let reader = ScriptedReader::new(vec![
        Ok(vec![0xff, 0x00]),
        Err(ErrorKind::TimedOut.into()),
        Ok(vec![0x00, 0x00, 0x00]),
    ]);
    let mut decoder = ReportDecoder::new(reader);

    let result = decoder.next_event();
    assert!(matches!(result, Err(DecodeError::TransportEnded(_))));
}
