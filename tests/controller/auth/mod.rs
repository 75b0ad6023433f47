mod logout;

use super::*;
