//! Writes a deterministic `employees.csv` sample roster, including the
//! defect classes the cleaning pipeline repairs: padded/miscased
//! department and position text, malformed and missing salaries, and
//! tenure values exceeding what the age allows.

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

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let departments: Vec<(&str, Vec<&str>, (i64, i64))> = vec![
        (
            "Engineering",
            vec!["Developer", "Devops Engineer", "Qa Analyst"],
            (55_000, 120_000),
        ),
        (
            "Sales",
            vec!["Account Manager", "Sales Rep"],
            (35_000, 90_000),
        ),
        (
            "Human Resources",
            vec!["Recruiter", "Hr Generalist"],
            (38_000, 75_000),
        ),
        ("Marketing", vec!["Designer", "Content Manager"], (40_000, 85_000)),
    ];

    let first_names = [
        "John", "Maria", "Luis", "Ana", "Pedro", "Sofia", "Carlos", "Lucia", "Diego",
        "Elena", "Jorge", "Carmen",
    ];
    let last_names = [
        "Smith", "Lopez", "Garcia", "Ortega", "Martinez", "Rios", "Vega", "Navarro",
    ];
    let genders = ["Male", "Female"];

    let mut writer = csv::Writer::from_path("employees.csv").expect("creating employees.csv");
    writer
        .write_record([
            "Name",
            "Department",
            "Position",
            "Gender",
            "Salary",
            "Age",
            "YearsAtCompany",
            "PerformanceScore",
        ])
        .expect("writing header");

    let mut rows = 0u32;
    for (dept, positions, (salary_lo, salary_hi)) in &departments {
        for _ in 0..30 {
            let name = format!("{} {}", rng.pick(&first_names), rng.pick(&last_names));
            let position = rng.pick(positions).to_string();
            let gender = rng.pick(&genders).to_string();
            let age = rng.range(21, 64);
            let salary = rng.range(*salary_lo, *salary_hi);

            // Inject the defects the pipeline is expected to repair.
            let department = match rows % 9 {
                0 => format!("  {dept} "),
                1 => dept.to_lowercase(),
                2 => dept.to_uppercase(),
                _ => dept.to_string(),
            };
            let salary_text = match rows % 11 {
                3 => String::new(),
                7 => "n/a".to_string(),
                _ => salary.to_string(),
            };
            let years = if rows % 13 == 5 {
                age + rng.range(1, 10)
            } else {
                rng.range(0, (age - 21).max(0))
            };

            writer
                .write_record([
                    name.as_str(),
                    department.as_str(),
                    position.to_lowercase().as_str(),
                    gender.as_str(),
                    salary_text.as_str(),
                    age.to_string().as_str(),
                    years.to_string().as_str(),
                    rng.range(1, 5).to_string().as_str(),
                ])
                .expect("writing row");
            rows += 1;
        }
    }

    writer.flush().expect("flushing employees.csv");
    println!("Wrote {rows} employees to employees.csv");
}
