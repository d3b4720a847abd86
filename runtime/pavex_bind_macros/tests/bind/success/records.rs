use pavex_bind::Bind;
use pavex_bind::reflect::{Record, Shape};

#[derive(Default, Bind)]
pub struct Address {
    city: String,
}

#[derive(Default, Bind)]
pub struct Person {
    #[bind(form = "full_name", query = "name", param = "person_name")]
    name: String,
    r#type: u8,
    tags: Vec<String>,
    nickname: Option<String>,
    address: Address,
    #[bind(skip)]
    _secret: std::sync::Mutex<()>,
}

#[derive(Bind)]
pub struct Borrowed<'a> {
    name: String,
    #[bind(skip)]
    origin: &'a str,
}

fn main() {
    let mut person = Person::default();
    let Shape::Record(record) = person.shape() else {
        panic!("Expected a record");
    };
    let names: Vec<_> = record.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["name", "type", "tags", "nickname", "address"]);
}
