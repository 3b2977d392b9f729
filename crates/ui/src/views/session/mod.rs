mod prompt;
mod view;

pub use view::SessionView;

#[cfg(test)]
pub(crate) use view::SessionTestHandles;
