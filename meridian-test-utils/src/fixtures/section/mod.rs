use crate::TestSetup;

pub mod data;
pub mod mockito;

impl TestSetup {
    pub fn section<'a>(&'a mut self) -> SectionFixtures<'a> {
        SectionFixtures { setup: self }
    }
}

pub struct SectionFixtures<'a> {
    pub setup: &'a mut TestSetup,
}
