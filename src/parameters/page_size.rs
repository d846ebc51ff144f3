///
/// A named paper size
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PageSize {
    pub name: &'static str,

    /// Width and height in inches
    pub size: (f64, f64)
}

const MM_PER_INCH: f64 = 25.4;

///
/// The paper sizes that PAGESIZE accepts (sizes in inches)
///
const PAGE_SIZES: [(&str, (f64, f64)); 15] = [
    ("letter",  (8.5, 11.0)),
    ("a",       (8.5, 11.0)),
    ("legal",   (8.5, 14.0)),
    ("ledger",  (17.0, 11.0)),
    ("tabloid", (11.0, 17.0)),
    ("b",       (11.0, 17.0)),
    ("c",       (17.0, 22.0)),
    ("d",       (22.0, 34.0)),
    ("e",       (34.0, 44.0)),
    ("a4",      (210.0/MM_PER_INCH, 297.0/MM_PER_INCH)),
    ("a3",      (297.0/MM_PER_INCH, 420.0/MM_PER_INCH)),
    ("a2",      (420.0/MM_PER_INCH, 594.0/MM_PER_INCH)),
    ("a1",      (594.0/MM_PER_INCH, 841.0/MM_PER_INCH)),
    ("a0",      (841.0/MM_PER_INCH, 1189.0/MM_PER_INCH)),
    ("b5",      (176.0/MM_PER_INCH, 250.0/MM_PER_INCH)),
];

impl PageSize {
    ///
    /// Looks up a paper size by name (case-insensitive)
    ///
    pub fn from_name(name: &str) -> Option<PageSize> {
        let name = name.trim();

        PAGE_SIZES.iter()
            .find(|(page_name, _)| page_name.eq_ignore_ascii_case(name))
            .map(|(page_name, size)| PageSize { name: *page_name, size: *size })
    }

    ///
    /// The default page size, US letter
    ///
    pub fn letter() -> PageSize {
        PageSize { name: "letter", size: (8.5, 11.0) }
    }

    pub fn width(&self) -> f64 { self.size.0 }
    pub fn height(&self) -> f64 { self.size.1 }
}
