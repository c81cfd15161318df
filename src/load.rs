use std::fs::File;
use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::{GridError, Point, SearchGrid};

/// Archive entry holding the packed grid: row count and column count as
/// big-endian i32, then one byte per cell in row-major order (0 free,
/// 1 blocked).
const GRID_ENTRY: &str = "grid.dat";

pub fn load_grid(file_path: &str) -> io::Result<SearchGrid> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut grid_file = archive.by_name(GRID_ENTRY)?;
    let mut buffer = Vec::new();
    grid_file.read_to_end(&mut buffer)?;

    let mut cursor = Cursor::new(buffer);

    let rows = cursor.read_i32::<BigEndian>()? as usize;
    let cols = cursor.read_i32::<BigEndian>()? as usize;

    let mut grid = vec![vec![0u8; cols]; rows];
    for row in &mut grid {
        cursor.read_exact(row)?;
    }

    SearchGrid::from_rows(grid).map_err(|e| match e {
        GridError::Empty => io::Error::new(io::ErrorKind::InvalidData, "archive holds empty grid"),
        GridError::Ragged => {
            io::Error::new(io::ErrorKind::InvalidData, "archive holds ragged grid")
        }
    })
}

pub fn save_grid(grid: &SearchGrid, file_path: &str) -> io::Result<()> {
    let file = File::create(file_path)?;
    let mut archive = ZipWriter::new(file);

    archive.start_file(GRID_ENTRY, FileOptions::default())?;
    archive.write_i32::<BigEndian>(grid.rows() as i32)?;
    archive.write_i32::<BigEndian>(grid.cols() as i32)?;

    for x in 0..grid.rows() {
        for y in 0..grid.cols() {
            let free = grid.is_free(&Point::new(x as i32, y as i32));
            archive.write_u8(if free { 0 } else { 1 })?;
        }
    }

    archive.finish()?;
    Ok(())
}
