use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const REGIONS: [(&str, f64); 4] = [("East", 1.15), ("West", 1.25), ("Central", 0.9), ("South", 0.8)];

/// Category → sub-category → (product, base price, base margin %).
const CATALOGUE: &[(&str, &[(&str, &[(&str, f64, f64)])])] = &[
    (
        "Technology",
        &[
            ("Phones", &[("Apple iPhone 14", 899.0, 18.0), ("Samsung Galaxy S23", 799.0, 16.0)]),
            ("Machines", &[("HP LaserJet Pro", 429.0, 9.0), ("Canon ImageCLASS", 1499.0, -4.0)]),
            ("Accessories", &[("Logitech MX Keys", 119.0, 24.0), ("SanDisk Ultra 128GB", 24.0, 30.0)]),
        ],
    ),
    (
        "Furniture",
        &[
            ("Chairs", &[("HON Ergonomic Chair", 349.0, 11.0), ("Global Task Chair", 189.0, 7.0)]),
            ("Tables", &[("Bretford Conference Table", 899.0, -12.0)]),
            ("Bookcases", &[("Sauder Bookcase", 159.0, -3.0), ("Bush Cubix Bookcase", 219.0, 2.0)]),
        ],
    ),
    (
        "Office Supplies",
        &[
            ("Paper", &[("Xerox Copy Paper", 12.0, 42.0), ("Easy-staple Paper", 18.0, 38.0)]),
            ("Binders", &[("GBC DocuBind", 259.0, 28.0), ("Avery Binder", 9.0, 33.0)]),
            ("Storage", &[("Fellowes Bankers Box", 32.0, 14.0)]),
        ],
    ),
];

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

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"DROP TABLE IF EXISTS sales;
        CREATE TABLE sales (
            "Region" TEXT NOT NULL,
            "Category" TEXT NOT NULL,
            "Sub-Category" TEXT NOT NULL,
            "Product Name" TEXT NOT NULL,
            "Year" INTEGER NOT NULL,
            "Month" TEXT NOT NULL,
            "Sales" REAL NOT NULL,
            "Profit" REAL NOT NULL,
            "Profit Margin (%)" REAL NOT NULL
        );"#,
    )
    .context("creating sales table")
}

fn main() -> Result<()> {
    let output_path = Path::new("data/sales.db");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut conn = Connection::open(output_path)
        .with_context(|| format!("opening {}", output_path.display()))?;
    create_schema(&conn)?;

    let mut rng = SimpleRng::new(42);
    let mut rows = 0usize;

    let tx = conn.transaction().context("starting transaction")?;
    {
        let mut insert = tx
            .prepare(r#"INSERT INTO sales VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#)
            .context("preparing insert")?;

        for year in 2021..=2023 {
            let growth = 1.0 + 0.08 * (year - 2021) as f64;
            for (month_idx, month) in MONTHS.iter().enumerate() {
                // Q4 peak.
                let season = if month_idx >= 9 { 1.35 } else { 1.0 };
                for &(region, region_factor) in &REGIONS {
                    for &(category, subs) in CATALOGUE {
                        for &(sub_category, products) in subs {
                            for &(product, price, base_margin) in products {
                                if rng.next_f64() < 0.35 {
                                    continue;
                                }
                                let units = rng.range(1.0, 6.0).floor();
                                let sales =
                                    round2(price * units * region_factor * season * growth * rng.range(0.85, 1.15));
                                let margin = round2(base_margin + rng.range(-6.0, 6.0));
                                let profit = round2(sales * margin / 100.0);

                                insert
                                    .execute(params![
                                        region,
                                        category,
                                        sub_category,
                                        product,
                                        year,
                                        month,
                                        sales,
                                        profit,
                                        margin
                                    ])
                                    .context("inserting row")?;
                                rows += 1;
                            }
                        }
                    }
                }
            }
        }
    }
    tx.commit().context("committing rows")?;

    println!("Wrote {rows} sales rows to {}", output_path.display());
    Ok(())
}
