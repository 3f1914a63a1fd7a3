use crate::kcmlib::{KcmError, Point, PointStore, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

pub struct PointParser {
    /* Read comma delimited points, one per line, while ensuring every line
    carries the same number of fields as the first one. Blank lines are skipped */
    delimiter: char,
}

impl Default for PointParser {
    fn default() -> Self {
        Self::new(',')
    }
}

impl PointParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn parse_path(&self, path: &Path) -> Result<PointStore> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }

    pub fn parse<R: BufRead>(&self, reader: R) -> Result<PointStore> {
        let mut points = Vec::new();
        let mut dim: Option<usize> = None;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let values = line
                .split(self.delimiter)
                .map(|field| match field.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    Ok(_) => Err(KcmError::NonFinite {
                        line: line_num,
                        field: field.trim().to_string(),
                    }),
                    Err(_) => Err(KcmError::Parse {
                        line: line_num,
                        field: field.to_string(),
                    }),
                })
                .collect::<Result<Vec<f64>>>()?;

            match dim {
                None => dim = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(KcmError::DimensionMismatch {
                        line: line_num,
                        expected,
                        found: values.len(),
                    });
                }
                Some(_) => {}
            }
            points.push(Point::new(values));
        }

        debug!("parsed {} points", points.len());
        PointStore::new(points)
    }
}
