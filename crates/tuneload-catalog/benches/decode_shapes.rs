use tuneload_catalog::{ArtistDecoder, ArtistGenreDecoder, GenreDecoder};
use tuneload_core::RecordDecoder;

fn artist_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                "1359446400\u{1}{i}\u{1}Artist name {i}\u{1}1\u{1}https://itunes.apple.com/artist/id{i}\u{1}1\u{2}"
            )
        })
        .collect()
}

fn genre_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let parent = if i % 10 == 0 { String::new() } else { (i / 10).to_string() };
            format!("1359446400\u{1}{i}\u{1}{parent}\u{1}Genre {i}\u{2}")
        })
        .collect()
}

fn link_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("1359446400\u{1}{}\u{1}{i}\u{1}{}\u{2}", i % 300, i % 2))
        .collect()
}

#[divan::bench]
fn decode_artists(bencher: divan::Bencher) {
    let lines = artist_lines(10_000);
    let decoder = ArtistDecoder::new();
    bencher.bench(|| {
        lines
            .iter()
            .map(|l| decoder.decode(l).unwrap().id)
            .sum::<i64>()
    });
}

#[divan::bench]
fn decode_genres(bencher: divan::Bencher) {
    let lines = genre_lines(10_000);
    let decoder = GenreDecoder::new();
    bencher.bench(|| {
        lines
            .iter()
            .filter(|l| decoder.decode(l).unwrap().parent_id.is_none())
            .count()
    });
}

#[divan::bench]
fn decode_links(bencher: divan::Bencher) {
    let lines = link_lines(10_000);
    let decoder = ArtistGenreDecoder::new();
    bencher.bench(|| {
        lines
            .iter()
            .filter(|l| decoder.decode(l).unwrap().is_primary)
            .count()
    });
}

fn main() {
    divan::main();
}
