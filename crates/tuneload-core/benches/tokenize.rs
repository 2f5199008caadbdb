use tuneload_core::statement::{BulkRow, InsertTemplate, build};
use tuneload_core::tokenize::{split, strip_trailing};
use tuneload_core::{FIELD_DELIMITER, Param, ROW_TERMINATOR};

fn synthetic_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                "1359446400\u{1}{i}\u{1}Artist name {i}\u{1}1\u{1}https://itunes.apple.com/artist/id{i}\u{1}1\u{2}"
            )
        })
        .collect()
}

struct Row(i64, String);

impl BulkRow for Row {
    fn bind(&self, params: &mut Vec<Param>) {
        params.push(self.0.into());
        params.push(self.1.as_str().into());
    }
}

const ROWS: InsertTemplate = InsertTemplate {
    table: "rows",
    columns: &["id", "name"],
};

#[divan::bench]
fn split_lines(bencher: divan::Bencher) {
    let lines = synthetic_lines(10_000);
    bencher.bench(|| {
        let mut fields = 0usize;
        for line in &lines {
            let tokens = split(line, FIELD_DELIMITER, 6);
            fields += strip_trailing(tokens[5], ROW_TERMINATOR).len();
        }
        fields
    });
}

#[divan::bench(args = [100, 1000, 5000])]
fn build_statement(bencher: divan::Bencher, rows: usize) {
    let batch: Vec<Row> = (0..rows as i64).map(|i| Row(i, format!("n{i}"))).collect();
    bencher.bench(|| build(&ROWS, &batch).unwrap());
}

fn main() {
    divan::main();
}
