/// Student avatar upload and download routes.
pub(crate) mod avatar;

/// Faculty management and statistics routes.
pub(crate) mod faculty;

/// Server information routes.
pub(crate) mod info;

/// Student management and statistics routes.
pub(crate) mod student;
