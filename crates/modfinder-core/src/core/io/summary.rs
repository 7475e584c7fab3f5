use crate::core::models::annotation::SummaryLine;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Writes the XML-like summary file: a `<bioml>` root with one `<protein>` element per
/// annotated accession, optionally followed by hand-curated lines.
pub struct SummaryWriter<W: Write> {
    writer: W,
    proteins: usize,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            proteins: 0,
        }
    }

    pub fn write_header(&mut self, species: &str, release: &str, date: &str) -> io::Result<()> {
        writeln!(self.writer, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            self.writer,
            r#"<bioml label="{} ENSEMBL v.{} potential modification annotation, gpmdb {}">"#,
            escape_attribute(species),
            escape_attribute(release),
            escape_attribute(date)
        )
    }

    pub fn write_protein(&mut self, line: &SummaryLine) -> io::Result<()> {
        self.proteins += 1;
        writeln!(
            self.writer,
            r#"<protein label="{}" pmods="{}" />"#,
            escape_attribute(&line.accession),
            escape_attribute(&line.pmods)
        )
    }

    /// Copies every line containing `<` from a hand-curated file, trimmed.
    /// Returns `Ok(false)` when the file does not exist.
    pub fn append_extra(&mut self, path: &Path) -> io::Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }
        let reader = BufReader::new(File::open(path)?);
        self.append_extra_from(reader)?;
        Ok(true)
    }

    pub fn append_extra_from(&mut self, reader: impl BufRead) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.contains('<') {
                writeln!(self.writer, "{}", line)?;
            }
        }
        Ok(())
    }

    pub fn proteins_written(&self) -> usize {
        self.proteins
    }

    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.writer, "</bioml>")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn line(accession: &str, pmods: &str) -> SummaryLine {
        SummaryLine {
            accession: accession.to_string(),
            pmods: pmods.to_string(),
        }
    }

    #[test]
    fn writes_header_proteins_and_footer() {
        let mut writer = SummaryWriter::new(Vec::new());
        writer
            .write_header("Homo sapiens", "104", "2021-06-01")
            .unwrap();
        writer
            .write_protein(&line("ENSP1", "42.010565@]K,79.966331@S"))
            .unwrap();
        assert_eq!(writer.proteins_written(), 1);
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(
            out,
            "<?xml version=\"1.0\"?>\n\
             <bioml label=\"Homo sapiens ENSEMBL v.104 potential modification annotation, gpmdb 2021-06-01\">\n\
             <protein label=\"ENSP1\" pmods=\"42.010565@]K,79.966331@S\" />\n\
             </bioml>\n"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut writer = SummaryWriter::new(Vec::new());
        writer.write_protein(&line("A&\"B\"", "<x>")).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(out.starts_with(r#"<protein label="A&amp;&quot;B&quot;" pmods="&lt;x&gt;" />"#));
    }

    #[test]
    fn extra_lines_without_markup_are_skipped() {
        let mut writer = SummaryWriter::new(Vec::new());
        let extra = "# curated\n  <protein label=\"X\" pmods=\"1@K\" />  \n\nplain text\n";
        writer.append_extra_from(Cursor::new(extra)).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "<protein label=\"X\" pmods=\"1@K\" />\n</bioml>\n");
    }

    #[test]
    fn missing_extra_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SummaryWriter::new(Vec::new());
        let appended = writer
            .append_extra(&dir.path().join("human_extra.xml"))
            .unwrap();
        assert!(!appended);
    }
}
