use pavex_bind::{Bind, BoxError, UnmarshalParam, UnmarshalText};

#[derive(Default, Bind)]
#[bind(unmarshal_param)]
pub struct Celsius(f64);

impl UnmarshalParam for Celsius {
    fn unmarshal_param(&mut self, param: &str) -> Result<(), BoxError> {
        self.0 = param.trim_end_matches('C').parse()?;
        Ok(())
    }
}

#[derive(Default, Bind)]
#[bind(unmarshal_text)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl UnmarshalText for Level {
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
        *self = match text {
            b"low" => Level::Low,
            b"high" => Level::High,
            _ => return Err("unknown level".into()),
        };
        Ok(())
    }
}

// Records can expose a capability too: the binder won't recurse into them.
#[derive(Default, Bind)]
#[bind(unmarshal_param, unmarshal_text)]
pub struct Point {
    x: i32,
    y: i32,
}

impl UnmarshalParam for Point {
    fn unmarshal_param(&mut self, param: &str) -> Result<(), BoxError> {
        let (x, y) = param.split_once(',').ok_or("expected `x,y`")?;
        self.x = x.parse()?;
        self.y = y.parse()?;
        Ok(())
    }
}

impl UnmarshalText for Point {
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
        self.unmarshal_param(std::str::from_utf8(text)?)
    }
}

#[derive(Default, Bind)]
pub struct Reading {
    #[bind(query = "t")]
    temperature: Celsius,
    level: Level,
    at: Point,
}

fn main() {
    let mut reading = Reading::default();
    let source = [("t", "21.5C"), ("level", "high"), ("at", "1,2")]
        .into_iter()
        .collect();
    pavex_bind::bind_data(&mut reading, &source, pavex_bind::Namespace::Query).unwrap();
    assert_eq!(reading.temperature.0, 21.5);
    assert!(matches!(reading.level, Level::High));
    assert_eq!((reading.at.x, reading.at.y), (1, 2));
}
