use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// The machine's connection to the outside world.
///
/// The `,` instruction pulls one byte through `read` and the `.` instruction
/// pushes one byte through `write`. Any source and sink will do: a console,
/// a fixed test buffer, or a pair of closures.
pub trait Io {
    /// Produce the next input byte, or `None` once input is exhausted.
    fn read(&mut self) -> io::Result<Option<u8>>;

    /// Consume one output byte.
    fn write(&mut self, byte: u8) -> io::Result<()>;

    /// Push any buffered output to its destination.
    ///
    /// Default: nothing is buffered.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Io + ?Sized> Io for &mut T {
    fn read(&mut self) -> io::Result<Option<u8>> {
        (**self).read()
    }

    fn write(&mut self, byte: u8) -> io::Result<()> {
        (**self).write(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// I/O over any byte reader and writer, e.g. stdin and stdout.
///
/// Output is flushed before every read so prompts show up before the program
/// blocks on input.
pub struct StreamIo<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl StreamIo<io::Stdin, io::BufWriter<io::Stdout>> {
    /// Console I/O on the process's stdin and stdout.
    pub fn console() -> Self {
        Self::new(io::stdin(), io::BufWriter::new(io::stdout()))
    }
}

impl<R: Read, W: Write> Io for StreamIo<R, W> {
    fn read(&mut self) -> io::Result<Option<u8>> {
        self.writer.flush()?;
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory I/O: reads from a fixed input buffer, records every output byte.
#[derive(Debug, Default, Clone)]
pub struct BufferIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferIo {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into().into(),
            output: Vec::new(),
        }
    }

    /// Every byte written so far, in order.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl Io for BufferIo {
    fn read(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

/// I/O backed by a pair of closures.
pub struct FnIo<R, W> {
    read: R,
    write: W,
}

impl<R, W> FnIo<R, W>
where
    R: FnMut() -> Option<u8>,
    W: FnMut(u8),
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> Io for FnIo<R, W>
where
    R: FnMut() -> Option<u8>,
    W: FnMut(u8),
{
    fn read(&mut self) -> io::Result<Option<u8>> {
        Ok((self.read)())
    }

    fn write(&mut self, byte: u8) -> io::Result<()> {
        (self.write)(byte);
        Ok(())
    }
}
