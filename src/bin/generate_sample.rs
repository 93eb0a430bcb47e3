use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One roster row. `url` is never filled so the explorer has an
/// entirely empty column to drop.
#[derive(Debug, Clone, Serialize)]
struct Character {
    name: String,
    race: Option<&'static str>,
    gender: Option<&'static str>,
    realm: Option<&'static str>,
    hair: Option<&'static str>,
    height: Option<&'static str>,
    spouse: Option<&'static str>,
    url: Option<&'static str>,
}

type Known = (
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

const KNOWN: &[Known] = &[
    ("Frodo Baggins", "Hobbits", "Male", Some("Shire"), Some("Dark brown"), None),
    ("Samwise Gamgee", "Hobbits", "Male", Some("Shire"), Some("Brown"), Some("Rosie Cotton")),
    ("Rosie Cotton", "Hobbits", "Female", Some("Shire"), Some("Brown"), Some("Samwise Gamgee")),
    ("Meriadoc Brandybuck", "Hobbits", "Male", Some("Shire"), Some("Brown"), None),
    ("Peregrin Took", "Hobbits", "Male", Some("Shire"), Some("Brown"), None),
    ("Gandalf", "Maiar", "Male", None, Some("Grey, later white"), None),
    ("Saruman", "Maiar", "Male", Some("Isengard"), Some("White"), None),
    ("Aragorn II Elessar", "Men", "Male", Some("Gondor"), Some("Dark"), Some("Arwen")),
    ("Arwen", "Elves", "Female", Some("Rivendell"), Some("Dark"), Some("Aragorn II Elessar")),
    ("Boromir", "Men", "Male", Some("Gondor"), Some("Dark"), None),
    ("Faramir", "Men", "Male", Some("Gondor"), Some("Dark"), Some("Éowyn")),
    ("Éowyn", "Men", "Female", Some("Rohan"), Some("Golden"), Some("Faramir")),
    ("Théoden", "Men", "Male", Some("Rohan"), Some("Blond"), None),
    ("Legolas", "Elves", "Male", Some("Mirkwood"), Some("Blond"), None),
    ("Galadriel", "Elves", "Female", Some("Lothlórien"), Some("Golden"), Some("Celeborn")),
    ("Celeborn", "Elves", "Male", Some("Lothlórien"), Some("Silver"), Some("Galadriel")),
    ("Elrond", "Elves", "Male", Some("Rivendell"), Some("Dark"), None),
    ("Gimli", "Dwarves", "Male", Some("Erebor"), Some("Red"), None),
    ("Thorin II Oakenshield", "Dwarves", "Male", Some("Erebor"), Some("Black"), None),
    ("Treebeard", "Ents", "Male", Some("Fangorn"), None, None),
    ("Gollum", "Hobbits", "Male", None, None, None),
    ("Shelob", "Spiders", "Female", Some("Mordor"), None, None),
];

const RACES: &[&str] = &["Hobbits", "Men", "Elves", "Dwarves", "Orcs"];
const REALMS: &[&str] = &["Shire", "Gondor", "Rohan", "Rivendell", "Erebor", "Mordor"];
const HAIR: &[&str] = &["Dark", "Brown", "Blond", "Black", "Red", "Grey"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// `Some(item)` with probability `p`, otherwise `None`.
    fn maybe<'a>(&mut self, p: f64, items: &[&'a str]) -> Option<&'a str> {
        (self.next_f64() < p).then(|| self.pick(items))
    }
}

fn roster(extras: usize, rng: &mut SimpleRng) -> Vec<Character> {
    let known = KNOWN
        .iter()
        .map(|&(name, race, gender, realm, hair, spouse)| Character {
            name: name.to_string(),
            race: Some(race),
            gender: Some(gender),
            realm,
            hair,
            height: None,
            spouse,
            url: None,
        });

    let generated = (0..extras).map(|i| {
        let race = rng.pick(RACES);
        Character {
            name: format!("{race} of the Third Age #{}", i + 1),
            race: Some(race),
            gender: rng.maybe(0.95, &["Male", "Female"]),
            realm: rng.maybe(0.6, REALMS),
            hair: rng.maybe(0.5, HAIR),
            height: rng.maybe(0.2, &["Tall", "Short", "3'6\"", "6'6\""]),
            spouse: None,
            url: None,
        }
    });

    known.chain(generated).collect::<Vec<_>>()
}

fn write_csv(path: &Path, characters: &[Character]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for c in characters {
        writer.serialize(c).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_record_batch(characters: &[Character]) -> Result<RecordBatch> {
    fn text_column(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    let schema = Arc::new(Schema::new(
        ["name", "race", "gender", "realm", "hair", "height", "spouse", "url"]
            .iter()
            .map(|n| Field::new(*n, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let col = |f: fn(&Character) -> Option<&str>| text_column(characters.iter().map(f).collect());

    RecordBatch::try_new(
        schema,
        vec![
            col(|c| Some(c.name.as_str())),
            col(|c| c.race),
            col(|c| c.gender),
            col(|c| c.realm),
            col(|c| c.hair),
            col(|c| c.height),
            col(|c| c.spouse),
            col(|c| c.url),
        ],
    )
    .context("building record batch")
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("lotr_characters.csv"));
    let parquet_path = csv_path.with_extension("parquet");

    let mut rng = SimpleRng::new(42);
    let characters = roster(80, &mut rng);

    write_csv(&csv_path, &characters)?;
    log::info!("Wrote {} characters to {}", characters.len(), csv_path.display());

    let batch = to_record_batch(&characters)?;
    write_parquet(&parquet_path, &batch)?;
    log::info!("Wrote {}", parquet_path.display());

    arrow::util::pretty::print_batches(&[batch.slice(0, 5)]).context("printing preview")?;
    Ok(())
}
