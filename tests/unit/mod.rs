mod auth;
mod labels;
mod permissions;
mod schedule;
mod tasks;
mod teams;
mod work_time;
