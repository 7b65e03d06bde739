// Handlers, grouped by surface:
//
// - `jobs`: the CRUD collection under /api/jobs
// - `session`: the public login/logout exchange under /auth
// - `pages`: admin page descriptors behind the route guard, plus /login

pub mod jobs;
pub mod pages;
pub mod session;
